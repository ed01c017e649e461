mod errors;
mod state;
