mod arrow;
mod config;
mod graph;
mod memory_scene;
mod protocol;
