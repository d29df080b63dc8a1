mod common;
mod sorting;
