//! Simulation layer tests.
