pub mod capture;
pub mod demo;
pub mod physics;
pub mod sim;
pub mod spatial;
pub mod viz;

#[cfg(test)]
mod test;
