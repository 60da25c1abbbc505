/*!

This is the long-form manual for `poll_display` and `polltab`.

## Poll methods

An assignment poll is conducted with one of four methods:

* `Y` voters hand out yes-votes to the candidates they support
* `N` voters hand out no-votes to the candidates they reject
* `YN` voters answer yes or no for every candidate
* `YNA` voters answer yes, no or abstain for every candidate

The method controls three aspects of the results table:

1. which column headers appear (`Y` shows only the yes column, `N` only the
   no column, `YN` and `YNA` show both),
2. which result cells are kept (cells for choices that were never collected
   under the method are dropped before rendering),
3. how amounts on candidate rows are displayed under `N`: the upstream data
   model stores the complementary tally, so the shown value is
   `votesvalid - amount`.

## Input format

`polltab` reads a single JSON document describing one poll:

```json
{
    "pollmethod": "YNA",
    "votesvalid": 10,
    "votescast": 12,
    "options": [
        { "user": "Ada Lovelace", "yes": 6, "no": 3, "abstain": 1 }
    ]
}
```

Counts that are unknown to the upstream system are encoded as negative
numbers and rendered as `n/a`. Counts for choices not collected by the
method may simply be omitted.

## Checking against a reference

With `--reference <file>`, the produced JSON summary is compared against the
given file and a textual diff is printed on mismatch. This mirrors how the
upstream system snapshots its rendered tables.

*/
