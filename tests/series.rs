use chrono::{TimeDelta, Utc};
use date_expr::{DateExpr, Result};

#[test]
fn series() -> Result<()> {
    let expr = DateExpr::new("logs/%Y/%m/%d/%H");
    let now = Utc::now();

    // Four hourly keys starting from now
    let keys: Vec<String> = expr.series(now, now + TimeDelta::hours(3))?.collect();
    assert_eq!(keys.len(), 4);
    keys.iter().for_each(|k| println!("key: {k}"));

    Ok(())
}
