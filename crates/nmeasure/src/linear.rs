//! How volume rescales under invertible linear maps
//!
//! Pushing volume forward through an invertible linear map `M` rescales it by a constant:
//! the preimage `M⁻¹(S)` of any measurable set `S` has volume `|det M|⁻¹ · vol(S)`.
//!
//! Rather than proving this matrix by matrix, the factor is computed from a
//! factorization of `M` into two kinds of elementary generators:
//!
//! * A [DiagonalMap] scales axis `i` by `dᵢ`. Each axis is a 1-D rescaling,
//!   which multiplies preimage lengths by `1/|dᵢ|`, so the factor is `∏ 1/|dᵢ|`.
//! * A [Transvection] adds `c·xⱼ` to axis `i`. With every other coordinate held fixed,
//!   it acts on axis `i` as a translation, and translations preserve length,
//!   so by Fubini its factor is exactly `1` (see [Transvection::fiber]).
//!
//! Factors of a composition multiply, because pushing forward by `B` and then by `A`
//! is pushing forward by `A∘B`.
//! A [GeneratorChain] is therefore sized by folding over its generators.
//!
//! Every invertible matrix has such a factorization; [GaussianDecomposer] finds one.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::axes::Axes;
use crate::ennreal::ENNReal;
use crate::error::{MeasureError, Result};
use crate::interval::Interval;
use crate::measure::Volume;
use crate::product::IntervalBox;
use crate::scalar::*;

/// A square matrix, stored row-major
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "MatrixRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct Matrix<T> {
    dim: usize,
    entries: Vec<T>,
}

impl<T: Real> Matrix<T> {
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut entries = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                entries.push(f(i, j));
            }
        }
        Matrix { dim, entries }
    }

    pub fn identity(dim: usize) -> Self {
        Matrix::from_fn(dim, |i, j| if i == j { T::one() } else { T::zero() })
    }

    pub fn diagonal(diagonal: &[T]) -> Self {
        Matrix::from_fn(diagonal.len(), |i, j| {
            if i == j {
                diagonal[i]
            } else {
                T::zero()
            }
        })
    }

    /// Build a matrix from its rows, which must all have one entry per row.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let dim = rows.len();
        let mut entries = Vec::with_capacity(dim * dim);
        for row in rows {
            check_dim(dim, row.len())?;
            entries.extend(row);
        }
        Ok(Matrix { dim, entries })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.entries[i * self.dim..(i + 1) * self.dim]
    }

    /// The matrix product `self · rhs`, i.e. the map that applies `rhs` first
    pub fn compose(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        check_dim(self.dim, rhs.dim)?;
        Ok(Matrix::from_fn(self.dim, |i, j| {
            (0..self.dim).fold(T::zero(), |acc, k| acc + self[(i, k)] * rhs[(k, j)])
        }))
    }

    pub fn apply(&self, v: &[T]) -> Result<Vec<T>> {
        check_dim(self.dim, v.len())?;
        Ok((0..self.dim)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (&m, &x)| acc + m * x)
            })
            .collect())
    }

    /// Apply to a point given as a named-axis struct
    pub fn apply_axes<A: Axes<T>>(&self, p: A) -> Result<A> {
        check_dim(self.dim, A::DIM)?;
        A::from_coords(self.apply(&p.into_coords())?)
    }

    /// The determinant, computed as the product of the diagonal factor of a
    /// [GaussianDecomposer] factorization. Singular matrices give zero.
    pub fn determinant(&self) -> T {
        match GaussianDecomposer::default().decompose(self) {
            Ok(chain) => chain.determinant(),
            Err(_) => T::zero(),
        }
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det > T::zero() || det < T::zero()
    }

    /// `row[target] += c · row[source]`
    fn add_row(&mut self, target: usize, source: usize, c: T) {
        for k in 0..self.dim {
            let delta = c * self[(source, k)];
            self[(target, k)] = self[(target, k)] + delta;
        }
    }

    /// `col[target] += c · col[source]`
    fn add_col(&mut self, target: usize, source: usize, c: T) {
        for k in 0..self.dim {
            let delta = c * self[(k, source)];
            self[(k, target)] = self[(k, target)] + delta;
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.entries[i * self.dim + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.entries[i * self.dim + j]
    }
}

/// Independent scaling of each axis: `xᵢ ↦ dᵢ·xᵢ`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagonalMap<T> {
    diagonal: Vec<T>,
}

impl<T: Real> DiagonalMap<T> {
    pub fn new(diagonal: Vec<T>) -> Self {
        DiagonalMap { diagonal }
    }

    pub fn dim(&self) -> usize {
        self.diagonal.len()
    }

    pub fn entries(&self) -> &[T] {
        &self.diagonal
    }

    pub fn determinant(&self) -> T {
        self.diagonal.iter().fold(T::one(), |acc, &d| acc * d)
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::diagonal(&self.diagonal)
    }

    pub fn apply(&self, v: &[T]) -> Result<Vec<T>> {
        check_dim(self.dim(), v.len())?;
        Ok(self.diagonal.iter().zip(v).map(|(&d, &x)| d * x).collect())
    }

    /// `∏ 1/|dᵢ|`, or [SingularMatrix](MeasureError::SingularMatrix) if any `dᵢ` is zero
    pub fn scaling_factor(&self) -> Result<ENNReal<T>> {
        if self.diagonal.iter().any(|&d| !(d > T::zero() || d < T::zero())) {
            return Err(MeasureError::SingularMatrix);
        }
        Ok(self
            .diagonal
            .iter()
            .map(|&d| ENNReal::of_real(d.abs()).inv())
            .product())
    }

    /// The preimage of a box, which is again a box: axis `i` is divided by `dᵢ`
    pub fn preimage_box(&self, b: &IntervalBox<T>) -> Result<IntervalBox<T>> {
        check_dim(self.dim(), b.dim())?;
        Ok(self
            .diagonal
            .iter()
            .zip(b.axes())
            .map(|(&d, axis)| axis.preimage_scale(d))
            .collect())
    }
}

/// A shear that adds `c·x[source]` to `x[target]` and fixes every other axis
///
/// As a matrix this is the identity plus `c` at row `target`, column `source`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "TransvectionRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct Transvection<T> {
    dim: usize,
    target: usize,
    source: usize,
    c: T,
}

impl<T: Real> Transvection<T> {
    pub fn new(dim: usize, target: usize, source: usize, c: T) -> Result<Self> {
        if target == source {
            return Err(MeasureError::DegenerateTransvection { axis: target });
        }
        let needed = target.max(source) + 1;
        if needed > dim {
            return Err(MeasureError::DomainMismatch {
                expected: dim,
                found: needed,
            });
        }
        Ok(Transvection {
            dim,
            target,
            source,
            c,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn coefficient(&self) -> T {
        self.c
    }

    pub fn determinant(&self) -> T {
        T::one()
    }

    pub fn inverse(&self) -> Self {
        Transvection { c: -self.c, ..*self }
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        let mut m = Matrix::identity(self.dim);
        m[(self.target, self.source)] = self.c;
        m
    }

    pub fn apply(&self, v: &[T]) -> Result<Vec<T>> {
        check_dim(self.dim, v.len())?;
        let mut out = v.to_vec();
        out[self.target] = v[self.target] + self.c * v[self.source];
        Ok(out)
    }

    /// Shears preserve volume
    pub fn scaling_factor(&self) -> ENNReal<T> {
        ENNReal::one()
    }

    /// The fiber of the preimage of `b` along the target axis through `point`.
    ///
    /// Holding every coordinate but the target fixed at `point`,
    /// the shear moves the target coordinate by `c·point[source]`,
    /// so the fiber is the target side of `b` translated back by that amount.
    /// It has the same length as the fiber of `b` itself through `point`,
    /// which is why the shear preserves the volume of `b`.
    pub fn fiber(&self, b: &IntervalBox<T>, point: &[T]) -> Result<Interval<T>> {
        check_dim(self.dim, b.dim())?;
        check_dim(self.dim, point.len())?;
        let others_inside = b
            .axes()
            .iter()
            .zip(point)
            .enumerate()
            .all(|(k, (axis, &x))| k == self.target || axis.contains(x));
        if !others_inside {
            return Ok(Interval::empty());
        }
        Ok(b.axes()[self.target].translate(-(self.c * point[self.source])))
    }
}

/// One factor of a [GeneratorChain]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: Real + serde::Deserialize<'de>"))
)]
pub enum Generator<T> {
    Diagonal(DiagonalMap<T>),
    Transvection(Transvection<T>),
}

impl<T: Real> Generator<T> {
    pub fn dim(&self) -> usize {
        match self {
            Generator::Diagonal(d) => d.dim(),
            Generator::Transvection(t) => t.dim(),
        }
    }

    pub fn determinant(&self) -> T {
        match self {
            Generator::Diagonal(d) => d.determinant(),
            Generator::Transvection(t) => t.determinant(),
        }
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        match self {
            Generator::Diagonal(d) => d.to_matrix(),
            Generator::Transvection(t) => t.to_matrix(),
        }
    }

    pub fn apply(&self, v: &[T]) -> Result<Vec<T>> {
        match self {
            Generator::Diagonal(d) => d.apply(v),
            Generator::Transvection(t) => t.apply(v),
        }
    }

    pub fn scaling_factor(&self) -> Result<ENNReal<T>> {
        match self {
            Generator::Diagonal(d) => d.scaling_factor(),
            Generator::Transvection(t) => Ok(t.scaling_factor()),
        }
    }
}

impl<T> From<DiagonalMap<T>> for Generator<T> {
    fn from(d: DiagonalMap<T>) -> Self {
        Generator::Diagonal(d)
    }
}

impl<T> From<Transvection<T>> for Generator<T> {
    fn from(t: Transvection<T>) -> Self {
        Generator::Transvection(t)
    }
}

/// An ordered product of generators `G₀ · G₁ · … · Gₖ`
///
/// As a map, the last generator is applied first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "GeneratorChainRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct GeneratorChain<T> {
    dim: usize,
    generators: Vec<Generator<T>>,
}

impl<T: Real> GeneratorChain<T> {
    /// The empty product, i.e. the identity on `dim` axes
    pub fn new(dim: usize) -> Self {
        GeneratorChain {
            dim,
            generators: Vec::new(),
        }
    }

    /// Append a generator on the right, i.e. to be applied before the existing ones
    pub fn push(&mut self, g: impl Into<Generator<T>>) -> Result<()> {
        let g = g.into();
        check_dim(self.dim, g.dim())?;
        self.generators.push(g);
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn generators(&self) -> &[Generator<T>] {
        &self.generators
    }

    pub fn determinant(&self) -> T {
        self.generators
            .iter()
            .fold(T::one(), |acc, g| acc * g.determinant())
    }

    pub fn to_matrix(&self) -> Result<Matrix<T>> {
        self.generators
            .iter()
            .try_fold(Matrix::identity(self.dim), |acc, g| acc.compose(&g.to_matrix()))
    }

    pub fn apply(&self, v: &[T]) -> Result<Vec<T>> {
        check_dim(self.dim, v.len())?;
        self.generators
            .iter()
            .rev()
            .try_fold(v.to_vec(), |acc, g| g.apply(&acc))
    }

    /// The product of the generators' scaling factors
    pub fn scaling_factor(&self) -> Result<ENNReal<T>> {
        self.generators
            .iter()
            .try_fold(ENNReal::one(), |acc, g| Ok(acc * g.scaling_factor()?))
    }
}

/// Factors an invertible matrix into diagonal maps and transvections
pub trait MatrixDecomposer<T: Real> {
    /// A chain whose product equals `m`,
    /// or [SingularMatrix](MeasureError::SingularMatrix) if `m` is not invertible.
    fn decompose(&self, m: &Matrix<T>) -> Result<GeneratorChain<T>>;
}

/// Gaussian elimination that uses only transvections, on both sides
///
/// Row operations clear each column below the pivot
/// and column operations clear each row to its right,
/// leaving a diagonal matrix `D` with `L · M · R = D`.
/// Instead of swapping in a larger pivot row, it is added to the pivot row
/// (with a sign chosen so the pivot grows), which is itself a transvection.
/// Inverting the recorded operations gives `M = L⁻¹ · D · R⁻¹`.
///
/// A pivot whose magnitude does not exceed `pivot_tolerance` is treated as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianDecomposer<T> {
    pub pivot_tolerance: T,
}

impl<T: Real> GaussianDecomposer<T> {
    pub fn with_pivot_tolerance(pivot_tolerance: T) -> Self {
        GaussianDecomposer { pivot_tolerance }
    }
}

impl<T: Real> MatrixDecomposer<T> for GaussianDecomposer<T> {
    fn decompose(&self, m: &Matrix<T>) -> Result<GeneratorChain<T>> {
        let n = m.dim();
        let mut a = m.clone();
        let mut row_ops = Vec::<Transvection<T>>::new();
        let mut col_ops = Vec::<Transvection<T>>::new();

        for k in 0..n {
            let (best_row, best) = (k..n)
                .map(|r| (r, a[(r, k)].abs()))
                .fold((k, T::zero()), |(br, bv), (r, v)| if v > bv { (r, v) } else { (br, bv) });
            if !(best > self.pivot_tolerance) {
                log::debug!("no pivot in column {} of {}x{} matrix", k, n, n);
                return Err(MeasureError::SingularMatrix);
            }
            if best_row != k && best > a[(k, k)].abs() {
                let sign = if a[(k, k)] * a[(best_row, k)] < T::zero() {
                    -T::one()
                } else {
                    T::one()
                };
                a.add_row(k, best_row, sign);
                row_ops.push(Transvection::new(n, k, best_row, sign)?);
            }
            let pivot = a[(k, k)];
            log::trace!("column {}: pivot {:?}", k, pivot);

            for i in k + 1..n {
                let c = a[(i, k)] / pivot;
                if c > T::zero() || c < T::zero() {
                    a.add_row(i, k, -c);
                    a[(i, k)] = T::zero();
                    row_ops.push(Transvection::new(n, i, k, -c)?);
                }
            }
            for j in k + 1..n {
                let c = a[(k, j)] / pivot;
                if c > T::zero() || c < T::zero() {
                    a.add_col(j, k, -c);
                    a[(k, j)] = T::zero();
                    col_ops.push(Transvection::new(n, k, j, -c)?);
                }
            }
        }

        let diagonal = DiagonalMap::new((0..n).map(|k| a[(k, k)]).collect());
        let mut chain = GeneratorChain::new(n);
        for op in &row_ops {
            chain.push(op.inverse())?;
        }
        chain.push(diagonal)?;
        for op in col_ops.iter().rev() {
            chain.push(op.inverse())?;
        }
        log::debug!(
            "decomposed {}x{} matrix into {} generators ({} row, {} column transvections)",
            n,
            n,
            chain.generators().len(),
            row_ops.len(),
            col_ops.len()
        );
        Ok(chain)
    }
}

/// Volume scaling under linear maps, using the given decomposer
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScaling<D> {
    decomposer: D,
}

impl<D> LinearScaling<D> {
    pub fn new(decomposer: D) -> Self {
        LinearScaling { decomposer }
    }

    /// The factor `c = 1/|det m|` such that `vol(m⁻¹(S)) = c · vol(S)` for every measurable `S`
    pub fn factor<T: Real>(&self, m: &Matrix<T>) -> Result<ENNReal<T>>
    where
        D: MatrixDecomposer<T>,
    {
        let chain = self.decomposer.decompose(m)?;
        check_dim(m.dim(), chain.dim())?;
        chain.scaling_factor()
    }

    /// The volume that `m` pushes forward onto `set`, i.e. `vol(m⁻¹(set))`
    pub fn pushforward_volume<T: Real, S: Volume<T> + ?Sized>(
        &self,
        m: &Matrix<T>,
        set: &S,
    ) -> Result<ENNReal<T>>
    where
        D: MatrixDecomposer<T>,
    {
        check_dim(m.dim(), set.dim())?;
        Ok(self.factor(m)? * set.volume())
    }
}

/// `1/|det m|`, or [SingularMatrix](MeasureError::SingularMatrix) when `det m = 0`
///
/// ```
/// use nmeasure::linear::{linear_scaling_factor, Matrix};
/// use nmeasure::ennreal::ENNReal;
///
/// let m = Matrix::diagonal(&[2.0, -4.0]);
/// assert_eq!(linear_scaling_factor(&m), Ok(ENNReal::of_real(0.125)));
/// ```
pub fn linear_scaling_factor<T: Real>(m: &Matrix<T>) -> Result<ENNReal<T>> {
    LinearScaling::new(GaussianDecomposer::default()).factor(m)
}

/// `vol(m⁻¹(set)) = |det m|⁻¹ · vol(set)`
pub fn pushforward_volume<T: Real, S: Volume<T> + ?Sized>(
    m: &Matrix<T>,
    set: &S,
) -> Result<ENNReal<T>> {
    LinearScaling::new(GaussianDecomposer::default()).pushforward_volume(m, set)
}

// Stored forms, checked by the same constructors as values built in code

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MatrixRepr<T> {
    dim: usize,
    entries: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Real> TryFrom<MatrixRepr<T>> for Matrix<T> {
    type Error = MeasureError;

    fn try_from(repr: MatrixRepr<T>) -> Result<Self> {
        let found = repr.entries.len();
        if repr.dim.checked_mul(repr.dim) != Some(found) {
            return Err(MeasureError::DomainMismatch {
                expected: repr.dim.saturating_mul(repr.dim),
                found,
            });
        }
        Ok(Matrix {
            dim: repr.dim,
            entries: repr.entries,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TransvectionRepr<T> {
    dim: usize,
    target: usize,
    source: usize,
    c: T,
}

#[cfg(feature = "serde")]
impl<T: Real> TryFrom<TransvectionRepr<T>> for Transvection<T> {
    type Error = MeasureError;

    fn try_from(repr: TransvectionRepr<T>) -> Result<Self> {
        Transvection::new(repr.dim, repr.target, repr.source, repr.c)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: Real + serde::Deserialize<'de>"))]
struct GeneratorChainRepr<T> {
    dim: usize,
    generators: Vec<Generator<T>>,
}

#[cfg(feature = "serde")]
impl<T: Real> TryFrom<GeneratorChainRepr<T>> for GeneratorChain<T> {
    type Error = MeasureError;

    fn try_from(repr: GeneratorChainRepr<T>) -> Result<Self> {
        let mut chain = GeneratorChain::new(repr.dim);
        for g in repr.generators {
            chain.push(g)?;
        }
        Ok(chain)
    }
}

fn check_dim(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MeasureError::DomainMismatch { expected, found })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_load_rejects_short_matrix() {
        let err = serde_json::from_str::<Matrix<f64>>(r#"{"dim":3,"entries":[1.0]}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("expected 9"), "{}", err);
    }

    #[test]
    fn test_loaded_matrix_scales_volume() {
        let m: Matrix<f64> =
            serde_json::from_str(r#"{"dim":2,"entries":[2.0,0.0,0.0,4.0]}"#).unwrap();
        assert_eq!(m, Matrix::diagonal(&[2., 4.]));
        assert_eq!(
            linear_scaling_factor(&m),
            Ok(ENNReal::of_real(0.125))
        );
    }

    #[test]
    fn test_load_rejects_bad_transvection() {
        assert!(serde_json::from_str::<Transvection<f64>>(
            r#"{"dim":2,"target":1,"source":1,"c":3.0}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Transvection<f64>>(
            r#"{"dim":2,"target":0,"source":5,"c":3.0}"#
        )
        .is_err());
    }

    #[test]
    fn test_load_rejects_mixed_dimension_chain() {
        let json = r#"{"dim":2,"generators":[{"Diagonal":{"diagonal":[1.0,2.0,3.0]}}]}"#;
        assert!(serde_json::from_str::<GeneratorChain<f64>>(json).is_err());
    }

    #[test]
    fn test_chain_survives_a_round_trip() {
        let mut chain = GeneratorChain::<f64>::new(2);
        chain.push(DiagonalMap::new(vec![2., 0.5])).unwrap();
        chain.push(Transvection::new(2, 0, 1, 3.).unwrap()).unwrap();
        let json = serde_json::to_string(&chain).unwrap();
        let back: GeneratorChain<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }
}
