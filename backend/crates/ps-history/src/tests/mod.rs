mod log_details;
