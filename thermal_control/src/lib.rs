#![no_std]
extern crate alloc;

pub mod config;
pub mod ramp_math;
pub mod regulation;
pub mod ring;
pub mod simulation;
pub mod thermal;
