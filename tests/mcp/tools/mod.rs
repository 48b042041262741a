mod insert;
mod merge;
