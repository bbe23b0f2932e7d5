pub mod library_panels;
