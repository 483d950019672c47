pub mod day_anchor;
pub mod lat_lon;
pub mod observation;
pub mod summary;
pub mod temp_category;
