pub mod assignment_pipeline;
