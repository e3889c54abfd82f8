mod cluster;
mod security_group;
