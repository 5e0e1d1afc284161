// Only a target for cargo metadata.
