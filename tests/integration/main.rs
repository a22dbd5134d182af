//! End-to-end CLI surface tests driving the compiled binary.
