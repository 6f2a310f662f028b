//! Component B/C — the field tower `Fq ⊂ Fq² ⊂ Fq⁶ ⊂ Fq¹²` (§4.B, §4.C) and
//! the object-pool discipline (§5) it is built on.

pub mod fq;
pub mod fq12;
pub mod fq2;
pub mod fq6;
pub mod pool;

pub use fq::{FieldError, FieldParams, Fq, FqDouble};
pub use fq12::{Fq12, Fq12Params};
pub use fq2::{Fq2, Fq2Params};
pub use fq6::{Fq6, Fq6Params};
