pub mod u101_file_qa;
