mod comments;
mod counters;
mod posts;
mod reports;
