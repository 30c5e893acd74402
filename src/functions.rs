//! Numeric functions and the shared sample grid
//!
//! The plots only ever show a closed set of single-argument functions:
//! - `Sine` / `Cosine` for the first surface (picked with buttons)
//! - `Log` / `Exp` for the second surface (picked by name from a dropdown)
//!
//! Names are resolved through `FunctionTable`, which rejects anything
//! outside the table with a typed error instead of panicking.

use crate::error::AppError;

/// First sample of the grid
pub const SAMPLE_START: f64 = 1e-3;
/// Last sample of the grid
pub const SAMPLE_STOP: f64 = 10.0;
/// Number of samples shared by both surfaces
pub const SAMPLE_COUNT: usize = 500;

/// A built-in single-argument function
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MathFunction {
    Sine,
    Cosine,
    Log,
    Exp,
}

impl MathFunction {
    #[cfg(test)]
    pub fn all() -> &'static [MathFunction] {
        &[
            MathFunction::Sine,
            MathFunction::Cosine,
            MathFunction::Log,
            MathFunction::Exp,
        ]
    }

    /// Short name, as used in the dropdown and the status bar
    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sine => "sin",
            MathFunction::Cosine => "cos",
            MathFunction::Log => "log",
            MathFunction::Exp => "exp",
        }
    }

    /// Evaluate at a single point
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            MathFunction::Sine => x.sin(),
            MathFunction::Cosine => x.cos(),
            MathFunction::Log => x.ln(),
            MathFunction::Exp => x.exp(),
        }
    }

    /// Evaluate at every `t + offset`
    pub fn evaluate(&self, samples: &[f64], offset: f64) -> Vec<f64> {
        samples.iter().map(|t| self.apply(t + offset)).collect()
    }
}

/// Fixed name -> function mapping for the dropdown surface
pub struct FunctionTable {
    entries: Vec<(&'static str, MathFunction)>,
}

impl FunctionTable {
    /// The table behind the second surface: `log` and `exp`
    pub fn dropdown() -> Self {
        Self {
            entries: vec![("log", MathFunction::Log), ("exp", MathFunction::Exp)],
        }
    }

    pub fn lookup(&self, name: &str) -> Result<MathFunction, AppError> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, f)| *f)
            .ok_or_else(|| AppError::UnknownFunction(name.to_string()))
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// `count` evenly spaced values from `start` to `stop`, both ends included
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // Pin the endpoint so rounding never leaves it short
            values[count - 1] = stop;
            values
        }
    }
}

/// The sample grid both surfaces are plotted over
pub fn sample_grid() -> Vec<f64> {
    linspace(SAMPLE_START, SAMPLE_STOP, SAMPLE_COUNT)
}
