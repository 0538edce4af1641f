pub mod bindings;
pub mod hosts;
pub mod interfaces;
pub mod ports;
pub mod services;
pub mod shared;

#[cfg(test)]
pub mod tests;
