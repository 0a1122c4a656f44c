// src/store/mod.rs

pub mod poi_tags;
pub mod tags;
