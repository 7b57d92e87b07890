//! Stub library; the integration tests live under `tests/`.
