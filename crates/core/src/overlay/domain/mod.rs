pub mod overlay_item;
pub mod overlay_sink;
pub mod view_transform;
