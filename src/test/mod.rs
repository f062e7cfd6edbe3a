mod config;
mod kernel;
mod quadtree;
mod simulator;
mod spawn_schedule;
