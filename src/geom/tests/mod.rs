mod test_ellipse_basic;
mod test_ring_basic;
