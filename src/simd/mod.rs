//! Lane-width abstraction for the packet math.
//!
//! The intersection code is written once against three types — `SimdF32`,
//! `SimdVec3` and `SimdBool` — and a `LANES` constant. Which backend provides
//! them is fixed at build time: the `avx512`, `avx` and `sse` cargo features
//! pick the matching x86 register width (the widest enabled one wins), and
//! without any of them, or on a non-x86_64 target, the one-lane scalar
//! fallback is used.
//!
//! The hardware backends issue their instructions unconditionally. On a host
//! that may lack the instruction set, consult `available()` before touching
//! any other item of the backend.

pub mod scalar;

#[cfg( target_arch = "x86_64" )]
pub mod sse;
#[cfg( target_arch = "x86_64" )]
pub mod avx;
#[cfg( target_arch = "x86_64" )]
pub mod avx512;

#[cfg( all( target_arch = "x86_64", feature = "avx512" ) )]
pub use self::avx512::{available, SimdBool, SimdF32, SimdVec3, LANES};

#[cfg( all( target_arch = "x86_64", feature = "avx", not( feature = "avx512" ) ) )]
pub use self::avx::{available, SimdBool, SimdF32, SimdVec3, LANES};

#[cfg( all( target_arch = "x86_64", feature = "sse",
            not( any( feature = "avx", feature = "avx512" ) ) ) )]
pub use self::sse::{available, SimdBool, SimdF32, SimdVec3, LANES};

#[cfg( any( not( target_arch = "x86_64" ),
            not( any( feature = "sse", feature = "avx", feature = "avx512" ) ) ) )]
pub use self::scalar::{available, SimdBool, SimdF32, SimdVec3, LANES};
