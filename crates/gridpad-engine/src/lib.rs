//! gridpad_engine - cell model, coordinate codec and cell matrix.

pub mod engine;
