pub mod file_workflow;
