mod discovery;
mod filter;
