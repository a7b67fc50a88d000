pub mod musixmatch;
