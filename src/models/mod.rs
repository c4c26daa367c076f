pub mod dog;

pub use dog::{Dog, DogPatch, NewDog};
