#![deny(missing_docs)]
#![doc = "Value types with correct and deliberately broken equality, hash and ordering contracts, used to exercise the checker."]

pub mod decimal;
pub mod figure;
pub mod person;
pub mod phone;
pub mod point;
pub mod roster;
pub mod student;
pub mod text;

pub use decimal::{Decimal, DecimalError};
pub use figure::Figure;
pub use person::Person;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use point::{Color, ColorPoint, Point, PointKind, TaggedPoint};
pub use roster::{Enrollee, Handle, Roster};
pub use student::Student;
pub use text::Text;
