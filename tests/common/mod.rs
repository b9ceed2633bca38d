pub mod synthetic_cascade;
