pub mod articles;
pub mod logger;

#[cfg(test)]
pub(crate) mod testing;
