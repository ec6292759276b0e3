/*
Module: mappers

Declares mapper submodules and re-exports their public types. NROM lives in
`crate::mapper` next to the trait; boards with registers live here.

Implemented:
- UxROM (Mapper 2)
*/

pub mod uxrom;

pub use uxrom::Uxrom;
