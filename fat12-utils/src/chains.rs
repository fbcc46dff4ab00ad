use std::fmt::Write;

use fat12::io::std::FileIO;
use fat12::types::ClusterID;
use fat12::FAT12;

use super::Error;

/// Collapse consecutive clusters, e.g. `2-5,9,11-12`
pub(crate) fn ranges(clusters: &[ClusterID]) -> String {
    let mut output = String::new();
    let mut iter = clusters.iter().map(|&c| u32::from(c)).peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if !output.is_empty() {
            output.push(',');
        }
        let result = match start == end {
            true => write!(output, "{}", start),
            false => write!(output, "{}-{}", start, end),
        };
        result.ok();
    }
    output
}

pub fn chains(fat12: &mut FAT12<FileIO>) -> Result<(), Error> {
    let chain_set = fat12.chains()?;
    for chain in &chain_set {
        println!("{:5} {:5} {}", chain.head(), chain.len(), ranges(chain.clusters()));
    }
    for rejection in chain_set.rejections() {
        let walked = ranges(&rejection.clusters);
        println!("{:5} rejected: {} [{}]", rejection.head, rejection.defect, walked);
    }
    println!("{} chains, {} clusters", chain_set.len(), chain_set.num_clusters());
    Ok(())
}

#[cfg(test)]
mod test {
    use fat12::types::ClusterID;

    use super::ranges;

    #[test]
    fn test_ranges() {
        let clusters: Vec<ClusterID> = [2u32, 3, 4, 5, 9, 11, 12, 7].map(ClusterID::from).to_vec();
        assert_eq!(ranges(&clusters), "2-5,9,11-12,7");
        assert_eq!(ranges(&[]), "");
    }
}
