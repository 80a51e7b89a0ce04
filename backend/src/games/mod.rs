pub mod backend_spin_tracker;
