pub mod alignment;
pub mod annotation;
pub mod base;
pub mod builder;
pub mod column;

// re-export for cleaner imports
pub use self::alignment::{Alignment, CigarOp, OpKind};
pub use self::annotation::{Annotation, Feature, FeatureKind};
pub use self::base::Base;
pub use self::builder::ColumnsBuilder;
pub use self::column::{AlignedColumn, AlignedColumns};
