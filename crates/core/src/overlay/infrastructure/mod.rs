pub mod json_lines_overlay_writer;
