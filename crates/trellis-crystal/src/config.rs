//! Named crystal structures and their configuration.

use crate::basis::Basis;
use crate::crystal::Crystal;
use crate::error::CrystalError;
use crate::lattice_crystal::LatticeCrystal;
use crate::primitive::Primitive;
use std::fmt;

/// `c / a` of close-packed HCP, `√(8/3)`.
pub const IDEAL_HCP_C_OVER_A: f64 = 1.632_993_161_855_452;

// ── CrystalKind ────────────────────────────────────────────────────

/// The fixed-data crystal structures.
///
/// The cubic structures use a cubic primitive of edge `lattice_constant`
/// with the conventional multi-site basis; HCP uses a hexagonal primitive
/// of in-plane edge `lattice_constant`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrystalKind {
    /// One site per cube.
    #[default]
    SimpleCubic,
    /// Body-centred cubic, two sites per cube.
    Bcc,
    /// Face-centred cubic, four sites per cube.
    Fcc,
    /// Hexagonal close-packed, two sites per hexagonal cell.
    Hcp,
    /// Diamond, eight sites per cube.
    Diamond,
}

impl CrystalKind {
    /// The primitive and basis of this structure.
    ///
    /// `c_over_a` is only read for [`CrystalKind::Hcp`] and defaults to
    /// [`IDEAL_HCP_C_OVER_A`].
    pub fn crystal(self, lattice_constant: f64, c_over_a: Option<f64>) -> Result<Crystal, CrystalError> {
        let a = lattice_constant;
        let (primitive, basis) = match self {
            Self::SimpleCubic => (Primitive::cubic(3, a)?, Basis::monatomic(3)?),
            Self::Bcc => (Primitive::cubic(3, a)?, Basis::cubic_bcc()),
            Self::Fcc => (Primitive::cubic(3, a)?, Basis::cubic_fcc()),
            Self::Diamond => (Primitive::cubic(3, a)?, Basis::diamond()),
            Self::Hcp => {
                let ratio = c_over_a.unwrap_or(IDEAL_HCP_C_OVER_A);
                (Primitive::hexagonal(a, ratio * a)?, Basis::hcp())
            }
        };
        Crystal::new(primitive, basis)
    }

    /// [`crystal`](Self::crystal), ready for position lookup.
    pub fn build(self, lattice_constant: f64, c_over_a: Option<f64>) -> Result<LatticeCrystal, CrystalError> {
        Ok(LatticeCrystal::new(self.crystal(lattice_constant, c_over_a)?))
    }

    /// Sites per cell.
    pub fn basis_size(self) -> usize {
        match self {
            Self::SimpleCubic => 1,
            Self::Bcc | Self::Hcp => 2,
            Self::Fcc => 4,
            Self::Diamond => 8,
        }
    }
}

impl fmt::Display for CrystalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SimpleCubic => "simple cubic",
            Self::Bcc => "bcc",
            Self::Fcc => "fcc",
            Self::Hcp => "hcp",
            Self::Diamond => "diamond",
        };
        f.write_str(name)
    }
}

// ── CrystalConfig ──────────────────────────────────────────────────

/// Input for building one of the [`CrystalKind`] structures.
#[derive(Clone, Debug, PartialEq)]
pub struct CrystalConfig {
    /// Structure to build. Default: simple cubic.
    pub kind: CrystalKind,
    /// Cube edge, or in-plane edge for HCP. Default: 1.0.
    pub lattice_constant: f64,
    /// HCP axial ratio. `None` = [`IDEAL_HCP_C_OVER_A`]. Ignored otherwise.
    pub c_over_a: Option<f64>,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            kind: CrystalKind::SimpleCubic,
            lattice_constant: 1.0,
            c_over_a: None,
        }
    }
}

impl CrystalConfig {
    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<(), CrystalError> {
        if !self.lattice_constant.is_finite() || self.lattice_constant <= 0.0 {
            return Err(CrystalError::InvalidParameter {
                name: "lattice_constant",
                value: self.lattice_constant,
                reason: "must be finite and positive",
            });
        }
        if let Some(ratio) = self.c_over_a {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(CrystalError::InvalidParameter {
                    name: "c_over_a",
                    value: ratio,
                    reason: "must be finite and positive",
                });
            }
        }
        Ok(())
    }

    /// Validate and build.
    pub fn build(&self) -> Result<LatticeCrystal, CrystalError> {
        self.validate()?;
        self.kind.build(self.lattice_constant, self.c_over_a)
    }
}
