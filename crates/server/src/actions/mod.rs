pub mod delete;
pub mod lifecycle;
pub mod pin;

#[cfg(test)]
mod testing;
