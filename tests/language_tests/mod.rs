mod error_report_test;
mod semantics_test;
