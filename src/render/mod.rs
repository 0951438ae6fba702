//! Document layout routines.

pub mod excel;
pub mod pdf;
pub mod words;
