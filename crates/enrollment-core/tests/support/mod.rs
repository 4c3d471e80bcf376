pub mod enrollment_testkit;
