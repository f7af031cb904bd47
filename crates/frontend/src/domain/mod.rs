pub mod a001_grid_configuration;
pub mod a002_content_entity;
