mod address_picker;

pub use address_picker::pick_address;
