pub mod json_lines_frame_reader;
