pub mod generate;

pub use generate::plateau_sweep;
pub use generate::pulse_sweep;
