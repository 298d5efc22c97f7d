// Adapters layer: concrete storage collaborators behind `PractitionerRepository`.

pub mod json_file;
pub mod memory;
mod table;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
