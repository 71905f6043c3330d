//! Workspace tooling package. It carries the pre-commit hook configuration
//! and has no code of its own.
