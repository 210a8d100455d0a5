mod callbacks;
mod helpers;
mod mocks;
mod orders;
