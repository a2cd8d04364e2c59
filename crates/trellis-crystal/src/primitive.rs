//! Primitive vectors of a Bravais lattice.
//!
//! A [`Primitive`] holds `D` linearly independent vectors in `D`-dimensional
//! space, stored as the columns of a matrix `A`. A lattice index `n` maps to
//! the position `A n = Σ n[i] * a[i]`. The [`PrimitiveKind`] records which
//! symmetry the vectors were built from; every mutator rebuilds all vectors
//! from the updated parameters, so the symmetry constraints always hold.

use crate::error::CrystalError;
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;
use trellis_core::Coord;

/// Solved fractional coordinates within this distance below an integer are
/// rounded up to it before flooring.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// `|det A|` below this fraction of `∏ |a[i]|` counts as degenerate.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// The symmetry family of a [`Primitive`] and its free parameters.
///
/// Angles are in radians.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    /// Orthogonal vectors of one length, in any dimension.
    Cubic {
        /// Edge length.
        a: f64,
    },
    /// Orthogonal vectors `(a, a, c)`.
    Tetragonal {
        /// In-plane edge length.
        a: f64,
        /// Length along the unique axis.
        c: f64,
    },
    /// In-plane vectors of length `a` at 120°, perpendicular vector of length `c`.
    Hexagonal {
        /// In-plane edge length.
        a: f64,
        /// Length along the unique axis.
        c: f64,
    },
    /// Orthogonal vectors of independent lengths, in any dimension.
    Orthorhombic {
        /// One edge length per axis.
        sizes: Vec<f64>,
    },
    /// `a ⟂ b`, `b ⟂ c`, with angle `beta` between `a` and `c`.
    Monoclinic {
        /// Length of the first vector.
        a: f64,
        /// Length of the second vector.
        b: f64,
        /// Length of the third vector.
        c: f64,
        /// Angle between `a` and `c`, in `[π/2, π)`.
        beta: f64,
    },
    /// Free lengths and angles.
    Triclinic {
        /// Length of the first vector.
        a: f64,
        /// Length of the second vector.
        b: f64,
        /// Length of the third vector.
        c: f64,
        /// Angle between `b` and `c`.
        alpha: f64,
        /// Angle between `a` and `c`.
        beta: f64,
        /// Angle between `a` and `b`.
        gamma: f64,
    },
    /// Face-centred cubic primitive: vectors at 60° spanning a quarter of the
    /// conventional cube of edge `cubic_size`.
    Fcc {
        /// Edge of the conventional cubic cell.
        cubic_size: f64,
    },
    /// Body-centred cubic primitive: vectors at ≈109.47° spanning half of
    /// the conventional cube of edge `cubic_size`.
    Bcc {
        /// Edge of the conventional cubic cell.
        cubic_size: f64,
    },
    /// Explicit vectors with no symmetry constraint beyond independence.
    General,
}

impl PrimitiveKind {
    /// Short lowercase name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cubic { .. } => "cubic",
            Self::Tetragonal { .. } => "tetragonal",
            Self::Hexagonal { .. } => "hexagonal",
            Self::Orthorhombic { .. } => "orthorhombic",
            Self::Monoclinic { .. } => "monoclinic",
            Self::Triclinic { .. } => "triclinic",
            Self::Fcc { .. } => "fcc",
            Self::Bcc { .. } => "bcc",
            Self::General => "general",
        }
    }
}

/// `D` primitive vectors and the affine map they define.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    kind: PrimitiveKind,
    matrix: DMatrix<f64>,
    inverse: DMatrix<f64>,
    volume: f64,
}

impl Primitive {
    /// `d` orthogonal vectors of length `a`.
    pub fn cubic(d: usize, a: f64) -> Result<Self, CrystalError> {
        if d == 0 {
            return Err(CrystalError::InvalidParameter {
                name: "dimension",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Self::from_kind(PrimitiveKind::Cubic { a }, d)
    }

    /// Tetragonal vectors `(a, a, c)`.
    pub fn tetragonal(a: f64, c: f64) -> Result<Self, CrystalError> {
        Self::from_kind(PrimitiveKind::Tetragonal { a, c }, 3)
    }

    /// Hexagonal vectors: `a1 = (a, 0, 0)`, `a2 = (-a/2, a√3/2, 0)`, `a3 = (0, 0, c)`.
    pub fn hexagonal(a: f64, c: f64) -> Result<Self, CrystalError> {
        Self::from_kind(PrimitiveKind::Hexagonal { a, c }, 3)
    }

    /// Orthogonal vectors with one length per axis.
    pub fn orthorhombic(sizes: &[f64]) -> Result<Self, CrystalError> {
        if sizes.is_empty() {
            return Err(CrystalError::DimensionMismatch {
                what: "orthorhombic sizes",
                expected: 1,
                got: 0,
            });
        }
        Self::from_kind(
            PrimitiveKind::Orthorhombic {
                sizes: sizes.to_vec(),
            },
            sizes.len(),
        )
    }

    /// Monoclinic vectors `(a, 0, 0)`, `(0, b, 0)`, `(c cos β, 0, c sin β)`.
    pub fn monoclinic(a: f64, b: f64, c: f64, beta: f64) -> Result<Self, CrystalError> {
        Self::from_kind(PrimitiveKind::Monoclinic { a, b, c, beta }, 3)
    }

    /// Triclinic vectors with `a` along x and `b` in the xy plane.
    pub fn triclinic(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, CrystalError> {
        Self::from_kind(
            PrimitiveKind::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            },
            3,
        )
    }

    /// FCC primitive `(s/2)(0,1,1)`, `(s/2)(1,0,1)`, `(s/2)(1,1,0)` for cube edge `s`.
    pub fn fcc(cubic_size: f64) -> Result<Self, CrystalError> {
        Self::from_kind(PrimitiveKind::Fcc { cubic_size }, 3)
    }

    /// BCC primitive `(s/2)(-1,1,1)`, `(s/2)(1,-1,1)`, `(s/2)(1,1,-1)` for cube edge `s`.
    pub fn bcc(cubic_size: f64) -> Result<Self, CrystalError> {
        Self::from_kind(PrimitiveKind::Bcc { cubic_size }, 3)
    }

    /// Explicit vectors. All must have length `vectors.len()` and be
    /// linearly independent.
    pub fn general(vectors: &[DVector<f64>]) -> Result<Self, CrystalError> {
        Self::from_vectors(PrimitiveKind::General, vectors)
    }

    fn from_kind(kind: PrimitiveKind, d: usize) -> Result<Self, CrystalError> {
        let vectors = kind_vectors(&kind, d)?;
        Self::from_vectors(kind, &vectors)
    }

    fn from_vectors(kind: PrimitiveKind, vectors: &[DVector<f64>]) -> Result<Self, CrystalError> {
        let d = vectors.len();
        if d == 0 {
            return Err(CrystalError::DimensionMismatch {
                what: "primitive vectors",
                expected: 1,
                got: 0,
            });
        }
        if let Some(v) = vectors.iter().find(|v| v.len() != d) {
            return Err(CrystalError::DimensionMismatch {
                what: "primitive vector",
                expected: d,
                got: v.len(),
            });
        }
        let matrix = DMatrix::from_columns(vectors);
        let det = matrix.determinant();
        let scale: f64 = vectors.iter().map(|v| v.norm()).product();
        if !(det.abs() > SINGULAR_TOLERANCE * scale) {
            return Err(CrystalError::SingularPrimitive);
        }
        let inverse = matrix
            .clone()
            .try_inverse()
            .ok_or(CrystalError::SingularPrimitive)?;
        Ok(Self {
            kind,
            matrix,
            inverse,
            volume: det.abs(),
        })
    }

    /// Symmetry family and parameters.
    pub fn kind(&self) -> &PrimitiveKind {
        &self.kind
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.matrix.ncols()
    }

    /// A copy of the primitive vectors.
    pub fn vectors(&self) -> Vec<DVector<f64>> {
        self.matrix
            .column_iter()
            .map(|c| c.into_owned())
            .collect()
    }

    /// The primitive vectors as matrix columns.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Length of each primitive vector.
    pub fn size(&self) -> Vec<f64> {
        self.matrix.column_iter().map(|c| c.norm()).collect()
    }

    /// Angles between the primitive vectors, in radians.
    ///
    /// In 3D these are `[α, β, γ]`: the angles between `(b, c)`, `(a, c)`
    /// and `(a, b)`. In 2D the single angle between `(a, b)`. Otherwise
    /// every pair `(i, j)` with `i < j` in row-major order.
    pub fn angles(&self) -> Vec<f64> {
        let angle = |i: usize, j: usize| self.matrix.column(i).angle(&self.matrix.column(j));
        match self.d() {
            3 => vec![angle(1, 2), angle(0, 2), angle(0, 1)],
            d => (0..d)
                .flat_map(|i| (i + 1..d).map(move |j| (i, j)))
                .map(|(i, j)| angle(i, j))
                .collect(),
        }
    }

    /// Volume of one primitive cell, `|det A|`.
    pub fn cell_volume(&self) -> f64 {
        self.volume
    }

    /// Position of lattice index `index`: `Σ index[i] * a[i]`.
    pub fn position(&self, index: &[i32]) -> Result<DVector<f64>, CrystalError> {
        self.check_len("lattice index", index.len())?;
        let n = DVector::from_iterator(self.d(), index.iter().map(|&i| f64::from(i)));
        Ok(&self.matrix * n)
    }

    /// Cartesian position of fractional coordinates `fractional`.
    pub fn to_cartesian(&self, fractional: &DVector<f64>) -> Result<DVector<f64>, CrystalError> {
        self.check_len("fractional coordinates", fractional.len())?;
        Ok(&self.matrix * fractional)
    }

    /// Fractional coordinates of cartesian `position`, solving `A x = position`.
    pub fn to_fractional(&self, position: &DVector<f64>) -> Result<DVector<f64>, CrystalError> {
        self.check_len("position", position.len())?;
        Ok(&self.inverse * position)
    }

    /// Index of the cell containing `position`.
    ///
    /// Solves `A x = position` and floors each component. Components within
    /// a small tolerance below an integer round up to it, so
    /// `lattice_index(position(n)) == n` despite rounding error.
    ///
    /// Fails with [`CrystalError::InvalidParameter`] if a component is not
    /// finite or its cell index does not fit in an `i32`.
    pub fn lattice_index(&self, position: &DVector<f64>) -> Result<Coord, CrystalError> {
        let x = self.to_fractional(position)?;
        x.iter()
            .map(|&v| {
                let cell = (v + FLOOR_TOLERANCE).floor();
                if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&cell) {
                    Ok(cell as i32)
                } else {
                    Err(CrystalError::InvalidParameter {
                        name: "fractional coordinate",
                        value: v,
                        reason: "cell index must be finite and fit in an i32",
                    })
                }
            })
            .collect()
    }

    /// Like [`lattice_index`](Self::lattice_index), wrapped into a block of
    /// `cells[i]` cells per axis.
    pub fn lattice_index_periodic(
        &self,
        position: &DVector<f64>,
        cells: &[u32],
    ) -> Result<Coord, CrystalError> {
        self.check_len("cells", cells.len())?;
        if let Some(&n) = cells.iter().find(|&&n| n == 0) {
            return Err(CrystalError::InvalidParameter {
                name: "cells",
                value: f64::from(n),
                reason: "every axis needs at least one cell",
            });
        }
        let index = self.lattice_index(position)?;
        Ok(index
            .iter()
            .zip(cells)
            .map(|(&i, &n)| i64::from(i).rem_euclid(i64::from(n)) as i32)
            .collect())
    }

    /// Replace the length parameters of the current family.
    ///
    /// Expects one value for cubic, FCC and BCC (the cube edge), `[a, c]`
    /// for tetragonal and hexagonal, one per axis for orthorhombic, and
    /// `[a, b, c]` for monoclinic and triclinic. General primitives have no
    /// length parameters; use [`set_vectors`](Self::set_vectors).
    pub fn set_size(&mut self, size: &[f64]) -> Result<(), CrystalError> {
        let expect = |n: usize| {
            if size.len() == n {
                Ok(())
            } else {
                Err(CrystalError::DimensionMismatch {
                    what: "size",
                    expected: n,
                    got: size.len(),
                })
            }
        };
        let kind = match &self.kind {
            PrimitiveKind::Cubic { .. } => {
                expect(1)?;
                PrimitiveKind::Cubic { a: size[0] }
            }
            PrimitiveKind::Fcc { .. } => {
                expect(1)?;
                PrimitiveKind::Fcc {
                    cubic_size: size[0],
                }
            }
            PrimitiveKind::Bcc { .. } => {
                expect(1)?;
                PrimitiveKind::Bcc {
                    cubic_size: size[0],
                }
            }
            PrimitiveKind::Tetragonal { .. } => {
                expect(2)?;
                PrimitiveKind::Tetragonal {
                    a: size[0],
                    c: size[1],
                }
            }
            PrimitiveKind::Hexagonal { .. } => {
                expect(2)?;
                PrimitiveKind::Hexagonal {
                    a: size[0],
                    c: size[1],
                }
            }
            PrimitiveKind::Orthorhombic { .. } => {
                expect(self.d())?;
                PrimitiveKind::Orthorhombic {
                    sizes: size.to_vec(),
                }
            }
            &PrimitiveKind::Monoclinic { beta, .. } => {
                expect(3)?;
                PrimitiveKind::Monoclinic {
                    a: size[0],
                    b: size[1],
                    c: size[2],
                    beta,
                }
            }
            &PrimitiveKind::Triclinic {
                alpha, beta, gamma, ..
            } => {
                expect(3)?;
                PrimitiveKind::Triclinic {
                    a: size[0],
                    b: size[1],
                    c: size[2],
                    alpha,
                    beta,
                    gamma,
                }
            }
            PrimitiveKind::General => {
                return Err(CrystalError::InvalidParameter {
                    name: "size",
                    value: size.first().copied().unwrap_or(f64::NAN),
                    reason: "general primitives are set through their vectors",
                })
            }
        };
        self.rebuild(kind)
    }

    /// Replace the free angles: `[β]` for monoclinic, `[α, β, γ]` for
    /// triclinic. Every other family has its angles fixed by symmetry.
    pub fn set_angles(&mut self, angles: &[f64]) -> Result<(), CrystalError> {
        let kind = match self.kind {
            PrimitiveKind::Monoclinic { a, b, c, .. } if angles.len() == 1 => {
                PrimitiveKind::Monoclinic {
                    a,
                    b,
                    c,
                    beta: angles[0],
                }
            }
            PrimitiveKind::Triclinic { a, b, c, .. } if angles.len() == 3 => {
                PrimitiveKind::Triclinic {
                    a,
                    b,
                    c,
                    alpha: angles[0],
                    beta: angles[1],
                    gamma: angles[2],
                }
            }
            PrimitiveKind::Monoclinic { .. } | PrimitiveKind::Triclinic { .. } => {
                return Err(CrystalError::DimensionMismatch {
                    what: "angles",
                    expected: if matches!(self.kind, PrimitiveKind::Monoclinic { .. }) {
                        1
                    } else {
                        3
                    },
                    got: angles.len(),
                })
            }
            _ => {
                return Err(CrystalError::InvalidParameter {
                    name: "angles",
                    value: angles.first().copied().unwrap_or(f64::NAN),
                    reason: "angles of this family are fixed by symmetry",
                })
            }
        };
        self.rebuild(kind)
    }

    /// Replace the vectors of a general primitive.
    pub fn set_vectors(&mut self, vectors: &[DVector<f64>]) -> Result<(), CrystalError> {
        if self.kind != PrimitiveKind::General {
            return Err(CrystalError::InvalidParameter {
                name: "vectors",
                value: f64::NAN,
                reason: "only general primitives accept explicit vectors",
            });
        }
        if vectors.len() != self.d() {
            return Err(CrystalError::DimensionMismatch {
                what: "primitive vectors",
                expected: self.d(),
                got: vectors.len(),
            });
        }
        *self = Self::from_vectors(PrimitiveKind::General, vectors)?;
        Ok(())
    }

    /// Multiply every length by `factor`, keeping all angles.
    pub fn scale(&mut self, factor: f64) -> Result<(), CrystalError> {
        positive("scale factor", factor)?;
        let kind = match &self.kind {
            &PrimitiveKind::Cubic { a } => PrimitiveKind::Cubic { a: a * factor },
            &PrimitiveKind::Tetragonal { a, c } => PrimitiveKind::Tetragonal {
                a: a * factor,
                c: c * factor,
            },
            &PrimitiveKind::Hexagonal { a, c } => PrimitiveKind::Hexagonal {
                a: a * factor,
                c: c * factor,
            },
            PrimitiveKind::Orthorhombic { sizes } => PrimitiveKind::Orthorhombic {
                sizes: sizes.iter().map(|s| s * factor).collect(),
            },
            &PrimitiveKind::Monoclinic { a, b, c, beta } => PrimitiveKind::Monoclinic {
                a: a * factor,
                b: b * factor,
                c: c * factor,
                beta,
            },
            &PrimitiveKind::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => PrimitiveKind::Triclinic {
                a: a * factor,
                b: b * factor,
                c: c * factor,
                alpha,
                beta,
                gamma,
            },
            &PrimitiveKind::Fcc { cubic_size } => PrimitiveKind::Fcc {
                cubic_size: cubic_size * factor,
            },
            &PrimitiveKind::Bcc { cubic_size } => PrimitiveKind::Bcc {
                cubic_size: cubic_size * factor,
            },
            PrimitiveKind::General => PrimitiveKind::General,
        };
        if kind == PrimitiveKind::General {
            let scaled: Vec<DVector<f64>> = self.vectors().into_iter().map(|v| v * factor).collect();
            *self = Self::from_vectors(kind, &scaled)?;
            return Ok(());
        }
        self.rebuild(kind)
    }

    /// The reciprocal primitive, with vectors `b[j]` satisfying
    /// `a[i] · b[j] = 2π δ(i, j)`.
    ///
    /// FCC and BCC are each other's reciprocal with cube edge `4π / s`;
    /// cubic, tetragonal and orthorhombic keep their family with inverted
    /// lengths. Every other family yields a general primitive.
    pub fn reciprocal(&self) -> Result<Self, CrystalError> {
        let inv = |x: f64| 2.0 * PI / x;
        let d = self.d();
        match &self.kind {
            &PrimitiveKind::Cubic { a } => Self::from_kind(PrimitiveKind::Cubic { a: inv(a) }, d),
            &PrimitiveKind::Tetragonal { a, c } => Self::tetragonal(inv(a), inv(c)),
            PrimitiveKind::Orthorhombic { sizes } => {
                let sizes: Vec<f64> = sizes.iter().map(|&s| inv(s)).collect();
                Self::orthorhombic(&sizes)
            }
            &PrimitiveKind::Fcc { cubic_size } => Self::bcc(2.0 * inv(cubic_size)),
            &PrimitiveKind::Bcc { cubic_size } => Self::fcc(2.0 * inv(cubic_size)),
            _ => {
                let b = self.inverse.transpose() * (2.0 * PI);
                let vectors: Vec<DVector<f64>> =
                    b.column_iter().map(|c| c.into_owned()).collect();
                Self::general(&vectors)
            }
        }
    }

    fn rebuild(&mut self, kind: PrimitiveKind) -> Result<(), CrystalError> {
        *self = Self::from_kind(kind, self.d())?;
        Ok(())
    }

    fn check_len(&self, what: &'static str, len: usize) -> Result<(), CrystalError> {
        if len == self.d() {
            Ok(())
        } else {
            Err(CrystalError::DimensionMismatch {
                what,
                expected: self.d(),
                got: len,
            })
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, CrystalError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CrystalError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

fn angle_in(name: &'static str, value: f64, lo: f64, hi: f64, reason: &'static str) -> Result<f64, CrystalError> {
    if value >= lo && value < hi {
        Ok(value)
    } else {
        Err(CrystalError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

fn vec3(x: f64, y: f64, z: f64) -> DVector<f64> {
    DVector::from_column_slice(&[x, y, z])
}

fn diagonal(sizes: &[f64]) -> Vec<DVector<f64>> {
    let d = sizes.len();
    sizes
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let mut v = DVector::zeros(d);
            v[i] = s;
            v
        })
        .collect()
}

/// Vectors for every family except [`PrimitiveKind::General`].
fn kind_vectors(kind: &PrimitiveKind, d: usize) -> Result<Vec<DVector<f64>>, CrystalError> {
    let vectors = match *kind {
        PrimitiveKind::Cubic { a } => diagonal(&vec![positive("a", a)?; d]),
        PrimitiveKind::Tetragonal { a, c } => {
            let (a, c) = (positive("a", a)?, positive("c", c)?);
            diagonal(&[a, a, c])
        }
        PrimitiveKind::Hexagonal { a, c } => {
            let (a, c) = (positive("a", a)?, positive("c", c)?);
            vec![
                vec3(a, 0.0, 0.0),
                vec3(-0.5 * a, 0.5 * a * 3f64.sqrt(), 0.0),
                vec3(0.0, 0.0, c),
            ]
        }
        PrimitiveKind::Orthorhombic { ref sizes } => {
            for &s in sizes {
                positive("size", s)?;
            }
            diagonal(sizes)
        }
        PrimitiveKind::Monoclinic { a, b, c, beta } => {
            let (a, b, c) = (positive("a", a)?, positive("b", b)?, positive("c", c)?);
            let beta = angle_in("beta", beta, PI / 2.0, PI, "must lie in [π/2, π)")?;
            vec![
                vec3(a, 0.0, 0.0),
                vec3(0.0, b, 0.0),
                vec3(c * beta.cos(), 0.0, c * beta.sin()),
            ]
        }
        PrimitiveKind::Triclinic {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        } => {
            let (a, b, c) = (positive("a", a)?, positive("b", b)?, positive("c", c)?);
            let open = "must lie in (0, π)";
            let alpha = angle_in("alpha", alpha, f64::MIN_POSITIVE, PI, open)?;
            let beta = angle_in("beta", beta, f64::MIN_POSITIVE, PI, open)?;
            let gamma = angle_in("gamma", gamma, f64::MIN_POSITIVE, PI, open)?;
            let cx = c * beta.cos();
            let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
            let cz2 = c * c - cx * cx - cy * cy;
            if !(cz2 > 0.0) {
                return Err(CrystalError::InvalidParameter {
                    name: "alpha",
                    value: alpha,
                    reason: "angles do not enclose a positive volume",
                });
            }
            vec![
                vec3(a, 0.0, 0.0),
                vec3(b * gamma.cos(), b * gamma.sin(), 0.0),
                vec3(cx, cy, cz2.sqrt()),
            ]
        }
        PrimitiveKind::Fcc { cubic_size } => {
            let h = 0.5 * positive("cubic size", cubic_size)?;
            vec![vec3(0.0, h, h), vec3(h, 0.0, h), vec3(h, h, 0.0)]
        }
        PrimitiveKind::Bcc { cubic_size } => {
            let h = 0.5 * positive("cubic size", cubic_size)?;
            vec![vec3(-h, h, h), vec3(h, -h, h), vec3(h, h, -h)]
        }
        PrimitiveKind::General => {
            return Err(CrystalError::InvalidParameter {
                name: "kind",
                value: f64::NAN,
                reason: "general primitives are defined by explicit vectors",
            })
        }
    };
    Ok(vectors)
}
