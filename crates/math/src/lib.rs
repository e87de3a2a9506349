/// Curve pricing for the dynamic amplification analysis
///
/// This crate prices swaps against oracle-anchored pools: the stable-swap
/// curve whose flatness is set by the amplification factor `A`, the
/// exponential curve used for uncorrelated pairs, the slippage measure shared
/// by both, and sensitivity tables built on top of them.

pub mod error;
pub mod pool;
pub mod sensitivity;
pub mod stable;
pub mod volatile;

// Re-export commonly used items
pub use error::{CurveError, CurveResult};
pub use pool::{get_slippage, Pool, SwapDirection, MAX_RESERVE_DRAIN};
pub use sensitivity::{
    linspace, slippage_surface, swap_sensitivity, SensitivityRow, SlippageSurface,
    DEFAULT_SENSITIVITY_AMOUNTS,
};
pub use stable::{newton_raphson, swap_x_to_y_stable, swap_y_to_x_stable};
pub use volatile::{swap_x_to_y_volatile, swap_y_to_x_volatile};
