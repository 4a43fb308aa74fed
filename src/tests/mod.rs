mod gaussian_chain_test;
mod numerics_test;
mod probit_ep_test;
mod utils;
