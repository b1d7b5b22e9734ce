/// Resampling filter used when a pending transform is finally rasterized.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Sampling {
    /// Nearest-neighbor texel reads; texels stay sharp and axis-aligned
    /// with the transform that produced them.
    Nearest,
    /// Bilinear interpolation. The default, and the most mergeable.
    Linear,
    /// Bicubic interpolation from the two-parameter (B, C) filter family.
    Cubic {
        /// Kernel B parameter.
        b: f64,
        /// Kernel C parameter.
        c: f64,
    },
    /// Anisotropic filtering capped at the given maximum anisotropy.
    Aniso {
        /// Maximum anisotropy level.
        max_aniso: u32,
    },
}

impl Sampling {
    /// The Mitchell-Netravali cubic (B = C = 1/3).
    pub const MITCHELL: Sampling = Sampling::Cubic {
        b: 1.0 / 3.0,
        c: 1.0 / 3.0,
    };

    /// The Catmull-Rom cubic (B = 0, C = 1/2).
    pub const CATMULL_ROM: Sampling = Sampling::Cubic { b: 0.0, c: 0.5 };

    /// True for anisotropic sampling.
    pub fn is_aniso(self) -> bool {
        matches!(self, Sampling::Aniso { .. })
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling::Linear
    }
}

/// Decide whether two consecutive resamples can merge into one pass over the
/// concatenated transform without a visible difference, updating `next` to
/// the sampling the merged pass should use.
///
/// The lattice: two anisotropic samples merge to the larger anisotropy;
/// anisotropic absorbs a linear neighbor; a cubic absorbs a linear neighbor
/// or an identical cubic; two linears collapse to one. Nearest-neighbor only
/// merges across a stage whose transform is an integer translation
/// (`*_is_integer`), since any other intervening transform would blur its
/// texel alignment. Everything else is incompatible and forces the earlier
/// stage to rasterize first.
pub(crate) fn compatible_sampling(
    current: Sampling,
    current_is_integer: bool,
    next: &mut Sampling,
    next_is_integer: bool,
) -> bool {
    use Sampling::{Aniso, Cubic, Linear, Nearest};

    match (current, *next) {
        (Aniso { max_aniso: a }, Aniso { max_aniso: b }) => {
            *next = Aniso {
                max_aniso: a.max(b),
            };
            true
        }
        (Aniso { .. }, Linear) => {
            *next = current;
            true
        }
        (Linear, Aniso { .. }) => true,
        (Cubic { .. }, Linear) => {
            *next = current;
            true
        }
        (Cubic { b: cb, c: cc }, Cubic { b: nb, c: nc }) if cb == nb && cc == nc => {
            *next = current;
            true
        }
        (Linear, Cubic { .. }) => true,
        (Linear, Linear) => true,
        (_, Nearest) if current_is_integer => {
            // An integer current transform has default sampling.
            debug_assert_eq!(current, Linear);
            true
        }
        (Nearest, _) if next_is_integer => {
            // An integer next transform has default sampling.
            debug_assert_eq!(*next, Linear);
            *next = current;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/sampling.rs"]
mod tests;
