//! CSG evaluation kernels
//!
//! [`CsgKernel`] is the seam between part generators and geometry
//! evaluation. [`BspKernel`] is the pure-Rust implementation;
//! [`NullKernel`] stands in when no kernel is selected.

pub mod bsp;
mod bsp_kernel;
pub mod hull;
mod traits;

pub use bsp_kernel::BspKernel;
pub use hull::convex_hull;
pub use traits::*;

/// Get the default kernel
pub fn default_kernel() -> Box<dyn CsgKernel> {
    Box::new(BspKernel::new())
}

/// Look up a kernel by name (`"bsp"` or `"null"`)
pub fn kernel_by_name(name: &str) -> Option<Box<dyn CsgKernel>> {
    match name.to_ascii_lowercase().as_str() {
        "bsp" => Some(Box::new(BspKernel::new())),
        "null" | "none" => Some(Box::new(NullKernel)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kernel_is_available() {
        let kernel = default_kernel();
        assert!(kernel.is_available());
        assert_eq!(kernel.name(), "BSP");
    }

    #[test]
    fn test_kernel_by_name() {
        assert!(kernel_by_name("BSP").is_some_and(|k| k.is_available()));
        assert!(kernel_by_name("null").is_some_and(|k| !k.is_available()));
        assert!(kernel_by_name("occt").is_none());
    }
}
