use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix of `f64`.
///
/// Feature matrices are laid out features × samples, so column `j` holds
/// sample `j` and row `i` holds feature (or neuron) `i` across all samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Draws every entry from U[0, 1) and shifts it by -0.5, so entries are
    /// zero-centred in [-0.5, 0.5). Entries are drawn row by row.
    pub fn random_uniform_shifted<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() - 0.5;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data
        }
    }

    /// Builds a features × samples matrix from per-sample vectors, so each
    /// sample becomes one column.
    pub fn from_column_samples(samples: &[Vec<f64>]) -> Matrix {
        Matrix::from_data(samples.to_vec()).transpose()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` when `data` holds exactly `rows` rows of `cols` entries each.
    /// `from_data` takes the column count from the first row only.
    pub fn is_rectangular(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise binary operation over two same-shape matrices.
    /// `zip_map(other, |a, b| a * b)` is the Hadamard product.
    pub fn zip_map<F>(&self, other: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            panic!("Matrices are of incorrect sizes: {:?} vs {:?}", self.shape(), other.shape())
        }

        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(other.data.iter())
                .map(|(row_a, row_b)| {
                    row_a.iter().zip(row_b.iter()).map(|(&a, &b)| functor(a, b)).collect()
                })
                .collect(),
        }
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes: {:?} · {:?}", self.shape(), rhs.shape())
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                for j in 0..res.cols {
                    res.data[i][j] += a * rhs.data[k][j];
                }
            }
        }

        res
    }

    /// Adds a (rows × 1) column vector to every column.
    pub fn add_column(&self, column: &Matrix) -> Matrix {
        if column.rows != self.rows || column.cols != 1 {
            panic!("Column of shape {:?} cannot broadcast over {:?}", column.shape(), self.shape())
        }

        let mut res = self.clone();
        for (row, bias) in res.data.iter_mut().zip(column.data.iter()) {
            for x in row.iter_mut() {
                *x += bias[0];
            }
        }
        res
    }

    /// Sums across columns, keeping the result as a (rows × 1) column.
    pub fn sum_rows(&self) -> Matrix {
        Matrix::from_data(
            self.data.iter().map(|row| vec![row.iter().sum()]).collect()
        ).with_shape(self.rows, 1)
    }

    /// Sums down each column, keeping the result as a (1 × cols) row.
    pub fn sum_cols(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);
        for row in &self.data {
            for (acc, x) in res.data[0].iter_mut().zip(row.iter()) {
                *acc += x;
            }
        }
        res
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// In-place `self += alpha · rhs`.
    pub fn scaled_add(&mut self, alpha: f64, rhs: &Matrix) {
        if self.shape() != rhs.shape() {
            panic!("Matrices are of incorrect sizes: {:?} vs {:?}", self.shape(), rhs.shape())
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, r) in row.iter_mut().zip(rhs_row.iter()) {
                *x += alpha * r;
            }
        }
    }

    /// Per-row minimum as a (rows × 1) column.
    pub fn row_min(&self) -> Matrix {
        Matrix::from_data(
            self.data.iter()
                .map(|row| vec![row.iter().copied().fold(f64::INFINITY, f64::min)])
                .collect()
        ).with_shape(self.rows, 1)
    }

    /// Per-row maximum as a (rows × 1) column.
    pub fn row_max(&self) -> Matrix {
        Matrix::from_data(
            self.data.iter()
                .map(|row| vec![row.iter().copied().fold(f64::NEG_INFINITY, f64::max)])
                .collect()
        ).with_shape(self.rows, 1)
    }

    /// `from_data` infers zero columns for an empty row list; this pins the
    /// intended shape.
    fn with_shape(mut self, rows: usize, cols: usize) -> Matrix {
        self.rows = rows;
        self.cols = cols;
        self
    }
}
