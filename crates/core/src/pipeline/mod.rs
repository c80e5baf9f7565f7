pub mod infrastructure;
pub mod pipeline_executor;
pub mod pipeline_logger;
pub mod scan_plates_use_case;
