pub mod saved_roadmap;
