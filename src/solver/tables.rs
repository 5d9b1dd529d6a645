// src/solver/tables.rs

//! Dense row-major grids indexed by `(period, inventory level)`.

/// `V[t][I]`: minimum expected cost from the start of period `t` to the end
/// of the horizon. Has `T + 1` rows; unsolved cells hold `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    levels: usize,
    data: Vec<f64>,
}

impl ValueTable {
    pub(crate) fn unsolved(periods: usize, levels: usize) -> Self {
        Self {
            levels,
            data: vec![f64::INFINITY; periods * levels],
        }
    }

    /// Number of rows (`T + 1`).
    pub fn periods(&self) -> usize {
        self.data.len() / self.levels
    }

    /// Number of inventory levels (`I_max + 1`).
    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn get(&self, period: usize, inventory: usize) -> Option<f64> {
        if inventory >= self.levels {
            return None;
        }
        self.data.get(period * self.levels + inventory).copied()
    }

    pub fn row(&self, period: usize) -> &[f64] {
        &self.data[period * self.levels..(period + 1) * self.levels]
    }

    pub(crate) fn row_mut(&mut self, period: usize) -> &mut [f64] {
        &mut self.data[period * self.levels..(period + 1) * self.levels]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.levels)
    }
}

/// `policy[t][I]`: optimal order quantity at state `(t, I)`. Has `T` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    levels: usize,
    data: Vec<usize>,
}

impl PolicyTable {
    pub(crate) fn zeroed(periods: usize, levels: usize) -> Self {
        Self {
            levels,
            data: vec![0; periods * levels],
        }
    }

    /// Builds a table from explicit rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Option<Self> {
        let levels = rows.first()?.len();
        if levels == 0 || rows.iter().any(|row| row.len() != levels) {
            return None;
        }
        Some(Self {
            levels,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (`T`).
    pub fn periods(&self) -> usize {
        self.data.len() / self.levels
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn get(&self, period: usize, inventory: usize) -> Option<usize> {
        if inventory >= self.levels {
            return None;
        }
        self.data.get(period * self.levels + inventory).copied()
    }

    pub fn row(&self, period: usize) -> &[usize] {
        &self.data[period * self.levels..(period + 1) * self.levels]
    }

    pub(crate) fn row_mut(&mut self, period: usize) -> &mut [usize] {
        &mut self.data[period * self.levels..(period + 1) * self.levels]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.data.chunks(self.levels)
    }
}
