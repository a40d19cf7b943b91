use ecc::Curve;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let curve = Curve::new(2, 2, 17u32)?;
    let generator = curve.point(5, 1)?;
    println!("{}", curve);

    let mut multiple = generator.clone();
    let mut k = 1u32;
    while !multiple.is_infinity() {
        println!("{:>2}G = {}", k, multiple);
        multiple = (&multiple + &generator)?;
        k += 1;
    }
    println!("{:>2}G = {}", k, multiple);
    Ok(())
}
